use std::process::Command;
use vergen::EmitBuilder;

fn main() {
    let inside_git = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    // VERGEN_GIT_SHA is only emitted from a checkout; read it with option_env!
    let mut builder = EmitBuilder::builder();
    builder.build_timestamp();
    if inside_git {
        builder.git_sha(true);
    }

    builder.emit().expect("Unable to generate build metadata");
}
