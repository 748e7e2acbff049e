use luma_util::output::{format_status, StatusKind};

#[test]
fn test_format_status_right_aligns_label() {
    console::set_colors_enabled_stderr(false);
    let line = format_status(StatusKind::Action, "Indexed", "3 packages");
    assert_eq!(line, "     Indexed 3 packages");
}
