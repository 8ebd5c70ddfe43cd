/// Length of the truncated hex digest used for plan hashes.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Default project descriptor file name.
pub const PROJECT_FILENAME: &str = "modplan.json";

/// Current project descriptor format version.
pub const PROJECT_VERSION: u32 = 1;
