//! `kinspect diff` command.

use crate::context::ServiceContext;
use crate::diff::{compare_trees, DiffOptions};

/// Execute the `diff` command.
///
/// # Errors
///
/// Returns an error string if any folder is invalid or the master tree
/// cannot be walked.
pub fn run(ctx: &ServiceContext, opts: &DiffOptions) -> Result<(), String> {
    println!("\nStart comparing kphp outputs:");
    println!("{}  -vs-  {}\n", opts.master.display(), opts.cmp.display());

    let report = compare_trees(ctx, opts).map_err(|e| e.to_string())?;
    for difference in &report.differences {
        println!("{difference}");
    }
    println!("\n{}", report.summary());
    Ok(())
}
