//! Test-only package hosting the workspace-level golden tests in `tests/`.
