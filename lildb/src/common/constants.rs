// doc constants
pub const DOC_ID: &str = "_id";
pub const FIELD_SEPARATOR: &str = ".";
pub const OPERATOR_PREFIX: char = '$';

// id generation
pub const DEFAULT_ID_LENGTH: usize = 32;

// query operators
pub const OP_OR: &str = "$or";
pub const OP_AND: &str = "$and";
pub const OP_NOT: &str = "$not";
pub const OP_LT: &str = "$lt";
pub const OP_GT: &str = "$gt";
pub const OP_LTE: &str = "$lte";
pub const OP_GTE: &str = "$gte";
pub const OP_NE: &str = "$ne";
pub const OP_IN: &str = "$in";
pub const OP_NIN: &str = "$nin";
pub const OP_NULL: &str = "$null";
pub const OP_SIZE: &str = "$size";
pub const OP_REGEX: &str = "$regex";

// group keys for values that have no natural string form
pub const GROUP_KEY_ABSENT: &str = "undefined";
pub const GROUP_KEY_DOCUMENT: &str = "[object Object]";

// persistence
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
