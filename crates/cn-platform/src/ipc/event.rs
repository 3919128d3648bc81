/// Things the platform has observed. Events state facts; requests to act
/// travel as [`PlatformCommand`](super::PlatformCommand).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// 剪贴板出现了新的文本
    ClipboardChanged { content: String },
}
