use xshell::{cmd, Shell};

fn main() {
    // When run locally, results may differ from actual CI runs triggered by
    // .github/workflows/ci.yml
    // - Official CI runs latest stable
    // - Local runs use whatever the default Rust is locally
    let sh = Shell::new().expect("Could not create a shell");

    // See if any code needs to be formatted
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .expect("Please run `cargo fmt --all` to format your code.");

    // See if clippy has any complaints.
    cmd!(sh, "cargo clippy --workspace --all-targets --all-features -- -D warnings")
        .run()
        .expect("Please fix `cargo clippy` errors with all features enabled.");

    // Check for errors and warnings with no features enabled, which drops the `bevy::ui` integration
    cmd!(sh, "cargo clippy --workspace --no-default-features -- -D warnings")
        .run()
        .expect("Please fix `cargo clippy` errors with no features enabled.");

    // Run the unit, integration and doc tests
    cmd!(sh, "cargo test --workspace")
        .run()
        .expect("Please fix failing tests.");
}
