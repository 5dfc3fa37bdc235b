//! Binary entrypoint for fontmatch-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = fontmatch_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
