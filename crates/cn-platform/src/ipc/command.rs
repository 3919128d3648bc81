/// Requests the platform runtime acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCommand {
    /// 开始轮询剪贴板
    StartClipboardWatcher,
    /// 暂停轮询剪贴板
    StopClipboardWatcher,
    /// 退出运行时循环
    Shutdown,
}
