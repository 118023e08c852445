//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against recording mocks. All tests run on the host with no real link.

mod mock_transport;
mod registry_tests;
mod service_tests;
