/// プレゼンテーション層モジュール
///
/// コマンド結果とユーザー入出力の橋渡しを行います。
///
/// # モジュール
/// - `input`: APIキーの入力
/// - `output`: コマンド結果の出力（人間向け・機械向け）
/// - `progress`: 生成進捗のDTO変換

pub mod input;
pub mod output;
pub mod progress;
