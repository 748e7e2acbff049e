use std::path::Path;

use miette::Result;

use luma_ops::ops_index;
use luma_util::errors::LumaError;
use luma_util::output::{status, StatusKind};

pub fn exec(registry: Option<&Path>, check: bool) -> Result<()> {
    let registry = super::open_registry(registry)?;
    let outcome = ops_index::index(&registry, check)?;

    for error in &outcome.errors {
        status(StatusKind::Warn, "Excluded", &error.to_string());
    }

    let path = outcome.path.display();
    if check {
        if !outcome.up_to_date {
            return Err(LumaError::Index {
                message: format!("index is out of date: {path}"),
            }
            .into());
        }
        status(StatusKind::Info, "Fresh", &format!("{path} (revision {})", outcome.revision));
    } else if outcome.written {
        status(
            StatusKind::Action,
            "Indexed",
            &format!("{} package(s), revision {}", outcome.packages, outcome.revision),
        );
    } else {
        status(
            StatusKind::Info,
            "Fresh",
            &format!("{path} unchanged (revision {})", outcome.revision),
        );
    }
    Ok(())
}
