//! Human and JSON reports printed by the `nbh` subcommands.

mod check;
mod config;
mod detail;
mod overview;

pub use check::{EnvironmentCheck, ReleaseHighlight};
pub use config::NativeBuildConfig;
pub use detail::BuildDetail;
pub use overview::{BuildOverview, OVERVIEW_KEYS};

const RULE: &str = "=========================================================";

/// Title block shared by the framed reports.
pub(crate) fn banner(output: &mut String, title: &str) {
    output.push_str(RULE);
    output.push('\n');
    output.push_str(title);
    output.push('\n');
    output.push_str(RULE);
    output.push('\n');
}

pub(crate) fn footer(output: &mut String) {
    output.push_str(RULE);
    output.push('\n');
}

fn verdict(ok: bool, yes: &str, no: &str) -> String {
    if ok {
        format!("[ok] {}", yes)
    } else {
        format!("[fail] {}", no)
    }
}
