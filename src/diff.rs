//! Tree diff comparator: which generated files changed between two runs.
//!
//! Every generated file starts with a `//crc64` header that summarizes its
//! contents, so comparing the first bytes of both copies is enough to tell
//! whether they differ. Full diffs are only produced for the files that do.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::context::ServiceContext;
use crate::error::InspectError;

/// Bytes compared to decide whether two files differ.
pub const HEAD_LEN: usize = 64;

/// Bytes covered by the code checksum; equal here means only comments moved.
pub const CODE_CRC_LEN: usize = 30;

static VARS_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vars\d+\.cpp").expect("valid regex"));

/// Inputs of one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Output of the reference compiler.
    pub master: PathBuf,
    /// Output of the modified compiler.
    pub cmp: PathBuf,
    /// Where per-file diffs and copies are written.
    pub out: PathBuf,
    /// Do not report files whose code is unchanged.
    pub skip_comments: bool,
}

impl DiffOptions {
    /// Checks that all three folders exist.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Config`] naming the first bad flag.
    pub fn validate(&self, ctx: &ServiceContext) -> Result<(), InspectError> {
        let flags = [
            ("--master", &self.master),
            ("--cmp", &self.cmp),
            ("--out", &self.out),
        ];
        for (flag, dir) in flags {
            if !ctx.fs.is_dir(dir) {
                return Err(InspectError::Config(format!("invalid {flag} cmd argument")));
            }
        }
        Ok(())
    }
}

/// One reported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Relative path with `/` replaced by `_`; also the output file name.
    pub name: String,
    /// Only the comment checksum differs.
    pub comments_only: bool,
    /// The file cannot be read from the compared tree.
    pub missing: bool,
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "diff: {}", self.name)?;
        if self.comments_only {
            write!(f, " (comments only)")?;
        }
        if self.missing {
            write!(f, " (doesnt exist)")?;
        }
        Ok(())
    }
}

/// Totals of a comparison run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    /// `.cpp` and `.h` files seen in the master tree.
    pub total: usize,
    /// Differences that are expected after any change (globals, versions,
    /// comments).
    pub inessential: usize,
    /// Differences in real code.
    pub important: usize,
    /// Wall time of the run.
    pub elapsed_ms: i64,
    /// Files reported, in walk order.
    pub differences: Vec<Difference>,
}

impl DiffReport {
    /// Closing lines printed after a run.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "finished {} cpp/h files in {} msec\n\
             {} known differences (vars.cpp, etc)\n\
             {} important differences",
            self.total, self.elapsed_ms, self.inessential, self.important
        )
    }
}

/// Walks the master tree and compares every generated file with its
/// counterpart in the compared tree.
///
/// Per-file `diff`/`cp` failures are logged and never stop the run.
///
/// # Errors
///
/// Returns [`InspectError::Config`] when a folder is invalid or the master
/// tree cannot be walked.
pub fn compare_trees(ctx: &ServiceContext, opts: &DiffOptions) -> Result<DiffReport, InspectError> {
    opts.validate(ctx)?;
    let start = ctx.clock.now();
    let files = ctx.fs.walk_files(&opts.master).map_err(|e| {
        InspectError::Config(format!("cannot walk {}: {e}", opts.master.display()))
    })?;

    let mut report = DiffReport::default();
    for master_file in files.iter().filter(|p| is_generated_source(p)) {
        report.total += 1;
        let rel = master_file.strip_prefix(&opts.master).unwrap_or(master_file);
        let cmp_file = opts.cmp.join(rel);

        let master_head = head(ctx, master_file, HEAD_LEN).unwrap_or_default();
        let cmp_head = head(ctx, &cmp_file, HEAD_LEN);
        let missing = cmp_head.is_none();
        let cmp_head = cmp_head.unwrap_or_default();
        if master_head == cmp_head {
            continue;
        }

        let comments_only = crc_prefix(&master_head) == crc_prefix(&cmp_head);
        let important = is_important(master_file, comments_only);
        if important {
            report.important += 1;
        } else {
            report.inessential += 1;
        }

        if important || (comments_only && !opts.skip_comments) {
            let difference = Difference {
                name: rel.to_string_lossy().replace(['/', '\\'], "_"),
                comments_only,
                missing,
            };
            write_details(ctx, opts, master_file, &cmp_file, &difference);
            report.differences.push(difference);
        }
    }

    report.elapsed_ms = (ctx.clock.now() - start).num_milliseconds().max(0);
    log::debug!("compared {} files", report.total);
    Ok(report)
}

fn is_generated_source(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "cpp" || e == "h")
}

fn is_important(path: &Path, comments_only: bool) -> bool {
    let text = path.to_string_lossy();
    !comments_only && !VARS_FILE.is_match(&text) && !text.ends_with("_lib_version.h")
}

/// Reads the first `len` bytes of a file, zero-padded to `len`.
///
/// `None` when the file cannot be read, so an existing empty file and a
/// missing one never compare equal.
fn head(ctx: &ServiceContext, path: &Path, len: usize) -> Option<Vec<u8>> {
    let mut bytes = ctx.fs.read_head(path, len).ok()?;
    bytes.resize(len, 0);
    Some(bytes)
}

fn crc_prefix(head: &[u8]) -> &[u8] {
    &head[..head.len().min(CODE_CRC_LEN)]
}

fn write_details(
    ctx: &ServiceContext,
    opts: &DiffOptions,
    master_file: &Path,
    cmp_file: &Path,
    difference: &Difference,
) {
    let out = |prefix: &str| opts.out.join(format!("{prefix}{}", difference.name));
    // (command, highest exit code that still means success); diff exits 1
    // when the files differ and 2 when one of them is missing.
    let diff_ok = if difference.missing { 2 } else { 1 };
    let mut commands = vec![
        (diff_command(master_file, cmp_file, &out("")), diff_ok),
        (copy_command(master_file, &out("master_")), 0),
    ];
    if !difference.missing {
        commands.push((copy_command(cmp_file, &out("cmp_")), 0));
    }

    for (command, max_ok) in commands {
        let Some(command) = command else {
            log::warn!("cannot quote paths for {}", difference.name);
            continue;
        };
        match ctx.shell.run(&command) {
            Ok(output) if (0..=max_ok).contains(&output.exit_code) => {}
            Ok(output) => {
                log::warn!("`{command}` exited {}: {}", output.exit_code, output.stderr.trim());
            }
            Err(e) => log::warn!("`{command}` failed: {e}"),
        }
    }
}

fn quote(path: &Path) -> Option<String> {
    shlex::try_quote(&path.to_string_lossy()).ok().map(|q| q.into_owned())
}

fn diff_command(a: &Path, b: &Path, dest: &Path) -> Option<String> {
    Some(format!(
        "diff -u -I '// .*' -I '//.*' {} {} > {} 2>&1",
        quote(a)?,
        quote(b)?,
        quote(dest)?
    ))
}

fn copy_command(from: &Path, dest: &Path) -> Option<String> {
    Some(format!("cp {} {}", quote(from)?, quote(dest)?))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration, Utc};

    use super::*;
    use crate::context::SelectionMode;
    use crate::ports::{Clock, ShellExecutor, ShellOutput};

    struct CapturingShell {
        commands: Arc<Mutex<Vec<String>>>,
    }

    impl ShellExecutor for CapturingShell {
        fn run(
            &self,
            command: &str,
        ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
            self.commands.lock().unwrap().push(command.to_string());
            Ok(ShellOutput {
                exit_code: 1,
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    /// Advances 250ms on every call.
    struct SteppingClock {
        calls: Mutex<i64>,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            DateTime::<Utc>::UNIX_EPOCH + Duration::milliseconds(250 * *calls)
        }
    }

    struct Trees {
        _dir: tempfile::TempDir,
        opts: DiffOptions,
    }

    fn trees(master: &[(&str, &str)], cmp: &[(&str, &str)], skip_comments: bool) -> Trees {
        let dir = tempfile::tempdir().unwrap();
        let opts = DiffOptions {
            master: dir.path().join("master"),
            cmp: dir.path().join("cmp"),
            out: dir.path().join("out"),
            skip_comments,
        };
        std::fs::create_dir_all(&opts.out).unwrap();
        for (root, files) in [(&opts.master, master), (&opts.cmp, cmp)] {
            std::fs::create_dir_all(root).unwrap();
            for (rel, text) in files {
                let path = root.join(rel);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, text).unwrap();
            }
        }
        Trees { _dir: dir, opts }
    }

    fn context() -> (ServiceContext, Arc<Mutex<Vec<String>>>) {
        let commands = Arc::new(Mutex::new(Vec::new()));
        let mut ctx = ServiceContext::live(SelectionMode::List);
        ctx.shell = Box::new(CapturingShell { commands: Arc::clone(&commands) });
        ctx.clock = Box::new(SteppingClock { calls: Mutex::new(0) });
        (ctx, commands)
    }

    const CODE_A: &str = "//crc64:aaaaaaaaaaaaaaaa\n//crc64_with_comments:1111111111111111\n";
    const CODE_A_COMMENTS_B: &str =
        "//crc64:aaaaaaaaaaaaaaaa\n//crc64_with_comments:2222222222222222\n";
    const CODE_B: &str = "//crc64:bbbbbbbbbbbbbbbb\n//crc64_with_comments:1111111111111111\n";

    #[test]
    fn classifies_and_reports_differences() {
        let t = trees(
            &[
                ("o_1/same.cpp", CODE_A),
                ("o_1/changed.cpp", CODE_A),
                ("o_2/comments.h", CODE_A),
                ("globals/vars3.cpp", CODE_A),
                ("o_3/gone.cpp", CODE_A),
                ("README.md", "not generated"),
            ],
            &[
                ("o_1/same.cpp", CODE_A),
                ("o_1/changed.cpp", CODE_B),
                ("o_2/comments.h", CODE_A_COMMENTS_B),
                ("globals/vars3.cpp", CODE_B),
            ],
            false,
        );
        let (ctx, commands) = context();

        let report = compare_trees(&ctx, &t.opts).unwrap();

        assert_eq!(report.total, 5);
        assert_eq!(report.important, 2);
        assert_eq!(report.inessential, 2);
        assert_eq!(report.elapsed_ms, 250);
        let lines: Vec<String> = report.differences.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "diff: o_1_changed.cpp",
                "diff: o_2_comments.h (comments only)",
                "diff: o_3_gone.cpp (doesnt exist)",
            ]
        );

        let commands = commands.lock().unwrap();
        // diff + two copies for each present file, no cmp copy for the missing one
        assert_eq!(commands.len(), 3 + 3 + 2);
        assert!(commands[0].starts_with("diff -u -I '// .*' -I '//.*' "));
        assert!(commands[0].contains("out/o_1_changed.cpp") && commands[0].ends_with(" 2>&1"));
        assert!(commands[1].starts_with("cp ") && commands[1].contains("master_o_1_changed.cpp"));
        assert!(commands[2].contains("cmp_o_1_changed.cpp"));
    }

    #[test]
    fn skip_comments_hides_comment_only_changes() {
        let t = trees(&[("a.cpp", CODE_A)], &[("a.cpp", CODE_A_COMMENTS_B)], true);
        let (ctx, commands) = context();

        let report = compare_trees(&ctx, &t.opts).unwrap();

        assert_eq!(report.inessential, 1);
        assert!(report.differences.is_empty());
        assert!(commands.lock().unwrap().is_empty());
        assert!(report.summary().contains("1 known differences"));
    }

    #[test]
    fn empty_files_are_not_missing_files() {
        let t = trees(
            &[("o_1/empty.cpp", ""), ("o_1/blank.cpp", ""), ("o_1/cleared.cpp", CODE_A)],
            &[("o_1/blank.cpp", ""), ("o_1/cleared.cpp", "")],
            false,
        );
        let (ctx, _) = context();

        let report = compare_trees(&ctx, &t.opts).unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.important, 2);
        let mut lines: Vec<String> = report.differences.iter().map(ToString::to_string).collect();
        lines.sort();
        assert_eq!(lines, ["diff: o_1_cleared.cpp", "diff: o_1_empty.cpp (doesnt exist)"]);
    }

    #[test]
    fn invalid_folder_names_the_flag() {
        let t = trees(&[], &[], false);
        let (ctx, _) = context();
        let mut opts = t.opts.clone();
        opts.cmp = opts.cmp.join("missing");
        let err = compare_trees(&ctx, &opts).unwrap_err();
        assert_eq!(err.to_string(), "invalid --cmp cmd argument");
    }
}
