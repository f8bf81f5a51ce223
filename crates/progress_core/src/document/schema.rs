//! Element and attribute names of the board document.

pub const BOARD_TAG: &str = "board";
pub const CARDLIST_TAG: &str = "cardlist";
pub const ITEM_TAG: &str = "item";

pub const ATTR_ID: &str = "id";
pub const ATTR_NAME: &str = "name";
pub const ATTR_BACKGROUND: &str = "background";

/// Declaration line written at the top of every board file.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
