//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

/// テスト用のカタログテキストを作成する
///
/// # Arguments
/// * `nplurals` - `Plural-Forms` ヘッダーの複数形の数
/// * `entries` - ヘッダーの後に続く翻訳エントリ
pub(crate) fn catalog_text(nplurals: usize, entries: &str) -> String {
    format!(
        concat!(
            "msgid \"\"\n",
            "msgstr \"\"\n",
            "\"Language: fr\\n\"\n",
            "\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
            "\"Plural-Forms: nplurals={}; plural=(n > 1);\\n\"\n",
            "\n",
            "{}",
        ),
        nplurals, entries
    )
}

/// ファイルに書き込み、そのパスを返す
pub(crate) fn write_file(
    dir: &std::path::Path,
    name: &str,
    content: &str,
) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
