fn main() {
    #[cfg(feature = "cli")]
    pkgdiff::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("pkgdiff: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(2);
    }
}
