pub const APP_TITLE: &str = "Bulk Sender";
pub const APP_SUBTITLE: &str = "Send messages to multiple contacts effortlessly";

pub const TAB_TITLES: [&str; 2] = ["Manual Entry", "File Upload"];

pub const LABEL_MESSAGE: &str = "Message Content";
pub const LABEL_NUMBERS: &str = "Phone Numbers (one per line)";
pub const LABEL_FILE: &str = "Upload Numbers File (CSV/TXT path, Enter to select)";
pub const LABEL_STATUS: &str = "Status & Logs";

pub const NUMBERS_PLACEHOLDER: &str = "+1234567890\n+0987654321";
pub const MESSAGE_PLACEHOLDER: &str = "Enter your message here...";

pub const HELP_TEXT: &str =
    "Tab focus | Ctrl+N manual | Ctrl+F file | Ctrl+S send | Ctrl+U clear | F5 health | Esc quit";
