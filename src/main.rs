use std::process::ExitCode;

fn main() -> ExitCode {
    seo_atlas::cli::run()
}
