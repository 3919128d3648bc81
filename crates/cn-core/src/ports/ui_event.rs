use anyhow::Result;

/// Push channel towards the presentation layer.
///
/// 面向展示层的事件推送通道。
pub trait UiEventPort: Send + Sync {
    /// `clipboard://changed` with `{ "content": ... }`.
    fn emit_clipboard_changed(&self, content: &str) -> Result<()>;

    /// `panel://show`, no payload.
    fn emit_panel_shown(&self) -> Result<()>;
}
