fn main() {
    if let Err(err) = gnss_accuracy_client::app::run() {
        eprintln!("application failed: {err}");
        std::process::exit(1);
    }
}
