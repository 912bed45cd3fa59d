//! Repository layout checks: every source file has a unit test counterpart
