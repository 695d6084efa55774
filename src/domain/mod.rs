/// ドメイン層
///
/// APIやファイルシステムに依存しないビジネスルールを置く。
///
/// # モジュール
/// - `error`: 入力の制約違反
/// - `validator`: 送信前の入力検証
/// - `release`: リリースノートからのスクリプト組み立て
/// - `progress`: 動画生成の進捗イベント
/// - `formatter`: タイムスタンプ表示
pub mod error;
pub mod formatter;
pub mod progress;
pub mod release;
pub mod validator;
