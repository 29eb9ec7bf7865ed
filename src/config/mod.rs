use crate::i18n::Lang;
use crate::storage::DEFAULT_STORAGE_KEY;

/// Runtime settings, optionally overridden by the host page through `window.ENV`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    pub storage_key: String,
    pub lang: Lang,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            lang: Lang::En,
        }
    }
}

impl EditorConfig {
    /// Defaults, then the browser language, then `window.ENV.{STORAGE_KEY,LANG}`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(lang) = browser_lang() {
            config.lang = lang;
        }

        if let Some(key) = env_string("STORAGE_KEY").filter(|k| !k.trim().is_empty()) {
            config.storage_key = key;
        }
        if let Some(lang) = env_string("LANG").and_then(|l| Lang::from_tag(&l)) {
            config.lang = lang;
        }

        config
    }
}

fn env_string(name: &str) -> Option<String> {
    let env = web_sys::window()?.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }
    js_sys::Reflect::get(&env, &name.into()).ok()?.as_string()
}

fn browser_lang() -> Option<Lang> {
    let tag = web_sys::window()?.navigator().language()?;
    Lang::from_tag(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = EditorConfig::default();
        assert_eq!(c.storage_key, "horiztree_data");
        assert_eq!(c.lang, Lang::En);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_window_env_overrides() {
        let window = web_sys::window().expect("window");
        let env = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&env, &"STORAGE_KEY".into(), &"custom_key".into());
        let _ = js_sys::Reflect::set(&env, &"LANG".into(), &"ja".into());
        let _ = js_sys::Reflect::set(&window, &"ENV".into(), &env);

        let config = EditorConfig::from_env();
        assert_eq!(config.storage_key, "custom_key");
        assert_eq!(config.lang, Lang::Ja);

        let _ = js_sys::Reflect::delete_property(&window, &"ENV".into());
    }
}
