//! UI strings. Japanese and English, English as the fallback.

use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Lang {
    Ja,
    #[default]
    En,
}

impl Lang {
    /// From a BCP 47 tag such as `ja-JP`; only the primary subtag counts.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split('-').next()?.trim().to_lowercase();
        Lang::from_str(&primary).ok()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    AppTitle,
    BtnHelp,
    DepthAll,
    DepthLevel,
    BtnClear,
    BtnImport,
    BtnExport,
    DefaultNodeText,
    PlaceholderRoot,
    PlaceholderNode,
    HiddenNodes,
    BtnCancel,
    BtnInitialize,
    ConfirmClear,
    HelpTitle,
    BtnClose,
    ErrorInvalidJson,
}

fn ja(msg: Msg) -> &'static str {
    match msg {
        Msg::AppTitle => "HorizTree - Horizontal Outliner",
        Msg::BtnHelp => "ヘルプ",
        Msg::DepthAll => "表示: すべて",
        Msg::DepthLevel => "表示: {val}階層",
        Msg::BtnClear => "新規ツリー",
        Msg::BtnImport => "ファイルをロード",
        Msg::BtnExport => "ファイルに保存",
        Msg::DefaultNodeText => "無題",
        Msg::PlaceholderRoot => "ルートノード...",
        Msg::PlaceholderNode => "テキストを入力...",
        Msg::HiddenNodes => "... {count} 個の隠しノード",
        Msg::BtnCancel => "キャンセル",
        Msg::BtnInitialize => "初期化する",
        Msg::ConfirmClear => "全てのデータを削除して新しいプロジェクトを開始しますか？",
        Msg::HelpTitle => "キーボードショートカット",
        Msg::BtnClose => "閉じる",
        Msg::ErrorInvalidJson => "無効なファイル形式です。JSONファイルを選択してください。",
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::AppTitle => "HorizTree - Horizontal Outliner",
        Msg::BtnHelp => "Help",
        Msg::DepthAll => "Show: All",
        Msg::DepthLevel => "Show: {val} Levels",
        Msg::BtnClear => "New Tree",
        Msg::BtnImport => "Load File",
        Msg::BtnExport => "Save File",
        Msg::DefaultNodeText => "Untitled",
        Msg::PlaceholderRoot => "Root node...",
        Msg::PlaceholderNode => "Enter text...",
        Msg::HiddenNodes => "... {count} hidden nodes",
        Msg::BtnCancel => "Cancel",
        Msg::BtnInitialize => "Initialize",
        Msg::ConfirmClear => "Are you sure you want to delete all data and start a new project?",
        Msg::HelpTitle => "Keyboard Shortcuts",
        Msg::BtnClose => "Close",
        Msg::ErrorInvalidJson => "Invalid file format. Please select a JSON file.",
    }
}

pub fn t(lang: Lang, msg: Msg) -> &'static str {
    match lang {
        Lang::Ja => ja(msg),
        Lang::En => en(msg),
    }
}

/// `t` with `{name}` placeholders substituted.
pub fn tf(lang: Lang, msg: Msg, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(t(lang, msg).to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

/// `(keys, description)` rows for the help dialog.
pub fn shortcuts(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::Ja => &[
            ("Enter", "下に新しいノードを追加"),
            ("Shift + Enter", "ノード内で改行"),
            ("Tab", "右にインデント（子ノードにする）"),
            ("Shift + Tab", "左にアウトデント（親の兄弟にする）"),
            ("Backspace", "ノードを削除（空欄の時のみ）"),
            ("Shift + ↑ / ↓", "同階層のノード間でフォーカス移動"),
            ("Shift + ←", "親ノードにフォーカス移動"),
            ("Shift + →", "子ノードにフォーカス移動（なければ追加）"),
        ],
        Lang::En => &[
            ("Enter", "Add new node below"),
            ("Shift + Enter", "Line break within node"),
            ("Tab", "Indent right (make child node)"),
            ("Shift + Tab", "Outdent left (make parent's sibling)"),
            ("Backspace", "Delete node (only when empty)"),
            ("Shift + up / Shift + down", "Move focus between nodes at same level"),
            ("Shift + left", "Move focus to parent node"),
            ("Shift + right", "Move focus to child node (create if none)"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_from_tag() {
        assert_eq!(Lang::from_tag("ja-JP"), Some(Lang::Ja));
        assert_eq!(Lang::from_tag("EN"), Some(Lang::En));
        assert_eq!(Lang::from_tag("fr-FR"), None);
        assert_eq!(Lang::Ja.as_ref(), "ja");
    }

    #[test]
    fn test_interpolation() {
        assert_eq!(tf(Lang::En, Msg::DepthLevel, &[("val", "3")]), "Show: 3 Levels");
        assert_eq!(
            tf(Lang::Ja, Msg::HiddenNodes, &[("count", "2")]),
            "... 2 個の隠しノード"
        );
        assert_eq!(tf(Lang::En, Msg::BtnClose, &[("unused", "x")]), "Close");
    }

    #[test]
    fn test_shortcut_tables_line_up() {
        assert_eq!(shortcuts(Lang::Ja).len(), shortcuts(Lang::En).len());
    }
}
