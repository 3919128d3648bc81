use anyhow::Result;
use cn_core::ports::DisplayPort;
use cn_core::{MonitorInfo, Point, Rect};
use tauri::{AppHandle, Monitor, Runtime};

/// Cursor and monitor layout as reported by the windowing backend.
pub struct TauriDisplay<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriDisplay<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> DisplayPort for TauriDisplay<R> {
    fn cursor_position(&self) -> Result<Point> {
        let position = self.app.cursor_position()?;
        Ok(Point::new(position.x.round() as i32, position.y.round() as i32))
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        let primary = self.app.primary_monitor()?.map(|m| origin_of(&m));
        let monitors = self
            .app
            .available_monitors()?
            .iter()
            .map(|monitor| {
                let bounds = Rect::new(
                    monitor.position().x,
                    monitor.position().y,
                    monitor.size().width,
                    monitor.size().height,
                );
                let work = monitor.work_area();
                MonitorInfo {
                    name: monitor.name().cloned(),
                    bounds,
                    work_area: Rect::new(
                        work.position.x,
                        work.position.y,
                        work.size.width,
                        work.size.height,
                    ),
                    is_primary: primary == Some(bounds.origin),
                }
            })
            .collect();
        Ok(monitors)
    }
}

// Monitors carry no stable id; the primary one is recognised by its origin.
fn origin_of(monitor: &Monitor) -> Point {
    Point::new(monitor.position().x, monitor.position().y)
}
