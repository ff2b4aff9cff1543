/*! Integration tests for jsonobject.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - doc: Tests for parsing, both document forms, reference fields and typed accessors
 * - envelope: Tests for the base64 text envelope
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("jsonobject=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod doc;
mod envelope;
mod helpers;
