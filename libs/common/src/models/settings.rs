//! Site settings editable from the back office

use serde::{Deserialize, Serialize};

/// Social media links shown in the storefront footer.
///
/// An empty string means the link is not set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook_url: String,
    #[serde(default)]
    pub whatsapp_url: String,
    #[serde(default)]
    pub instagram_url: String,
}

impl SocialLinks {
    /// Setting keys paired with their values
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("facebook_url", self.facebook_url.as_str()),
            ("whatsapp_url", self.whatsapp_url.as_str()),
            ("instagram_url", self.instagram_url.as_str()),
        ]
    }
}
