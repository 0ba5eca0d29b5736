//! Share button content and method selection

pub const SHARE_TITLE: &str = "404 – Lost on the way to Mars";
pub const SHARE_TEXT: &str = "I got lost on Mars looking for this page 👩‍🚀🛠️";
pub const COPIED_NOTICE: &str = "Link copied to clipboard 🚀";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMethod {
    /// `navigator.share`
    Native,
    /// Copy the URL and confirm with an alert
    Clipboard,
}

pub fn choose_method(native_share_available: bool) -> ShareMethod {
    if native_share_available {
        ShareMethod::Native
    } else {
        ShareMethod::Clipboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_method() {
        assert_eq!(choose_method(true), ShareMethod::Native);
        assert_eq!(choose_method(false), ShareMethod::Clipboard);
    }
}
