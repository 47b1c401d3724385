//! Binary entrypoint for typv-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = typv_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
