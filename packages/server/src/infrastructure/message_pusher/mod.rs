//! メッセージ送信（relay dispatcher）の実装
//!
//! ## 実装
//!
//! - `websocket`: 接続ごとの writer タスクへのチャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
