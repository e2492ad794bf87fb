//! Command line runner for the `lodestone` library.

#[cfg(not(feature = "for-testing"))]
#[quit::main]
fn main() {
    lodestone::cli::run::run();
}

#[cfg(feature = "for-testing")]
fn main() {
    eprintln!(
        "Warning: The `for-testing` feature is enabled, which will clutter error messages\n\
         Tip: Use cargo flag --features=all-non-testing to include all features except `for-testing`"
    );
    lodestone::cli::run::run();
}
