use std::sync::mpsc as std_mpsc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use cn_core::ports::SystemClipboardPort;
use tracing::{debug, info};

type Reply<T> = std_mpsc::Sender<Result<T>>;

enum Request {
    ReadText(Reply<Option<String>>),
    WriteText(String, Reply<()>),
}

/// OS clipboard through clipboard-rs.
///
/// 通过 clipboard-rs 访问系统剪贴板。
///
/// The native context lives on a dedicated `clipboard-io` thread and is never
/// moved across threads; calls are forwarded to it and block until answered.
pub struct LocalClipboard {
    requests: std_mpsc::Sender<Request>,
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let (requests, inbox) = std_mpsc::channel::<Request>();
        let (ready_tx, ready_rx) = std_mpsc::channel::<Result<()>>();

        thread::Builder::new()
            .name("clipboard-io".into())
            .spawn(move || {
                let ctx = match ClipboardContext::new() {
                    Ok(ctx) => {
                        let _ = ready_tx.send(Ok(()));
                        ctx
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(anyhow!("ClipboardContext::new failed: {e}")));
                        return;
                    }
                };
                for request in inbox {
                    serve(&ctx, request);
                }
                debug!("Clipboard thread exiting");
            })
            .context("spawn clipboard thread failed")?;

        ready_rx
            .recv()
            .context("clipboard thread exited during startup")??;
        info!("Local clipboard ready");

        Ok(Self { requests })
    }

    fn call<T>(&self, build: impl FnOnce(Reply<T>) -> Request) -> Result<T> {
        let (reply, response) = std_mpsc::channel();
        self.requests
            .send(build(reply))
            .map_err(|_| anyhow!("clipboard thread is gone"))?;
        response
            .recv()
            .map_err(|_| anyhow!("clipboard thread dropped the request"))?
    }
}

fn serve(ctx: &ClipboardContext, request: Request) {
    match request {
        Request::ReadText(reply) => {
            let result = if ctx.has(ContentFormat::Text) {
                ctx.get_text().map(Some).map_err(|e| anyhow!(e))
            } else {
                Ok(None)
            };
            let _ = reply.send(result);
        }
        Request::WriteText(text, reply) => {
            let _ = reply.send(ctx.set_text(text).map_err(|e| anyhow!(e)));
        }
    }
}

impl SystemClipboardPort for LocalClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        self.call(Request::ReadText)
    }

    fn write_text(&self, content: &str) -> Result<()> {
        let content = content.to_string();
        self.call(move |reply| Request::WriteText(content, reply))
    }
}
