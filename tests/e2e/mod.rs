// End-to-end tests for the PDF Narrator HTTP API
//
// Each test starts the real router on a random local port. Upload and audio
// directories live in a per-test temporary directory and speech synthesis
// goes through an in-memory fake backend, so tests are isolated from each
// other and from any external provider.

mod test_conversion;
mod test_desktop_app;
mod test_health;
