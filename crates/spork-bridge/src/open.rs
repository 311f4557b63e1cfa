//! Target window resolution for open-file requests.

use spork_common::{OpenRequest, WindowId};
use tracing::debug;

use crate::host::{self, EditorHost};

/// Find the window that should show `request`.
///
/// Tries, in order: a window bound to the project; any window that already
/// has the file open; and finally asks the host to open the file and
/// rescans for a window that now has it.
pub fn resolve_target_window<H: EditorHost + ?Sized>(
    host: &H,
    request: &OpenRequest,
) -> Option<WindowId> {
    if let Some(window) = host::window_bound_to(host, &request.project) {
        return Some(window);
    }

    let full_path = request.full_path();
    if let Some(window) = host::window_with_file(host, &full_path) {
        return Some(window);
    }

    debug!(path = %full_path, "no window has file open, asking host to open it");
    host.open_file(&full_path);
    host::window_with_file(host, &full_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeHost, HostCall};

    fn request() -> OpenRequest {
        OpenRequest {
            project: "/p".into(),
            path: "src/a.js".into(),
            line: "10".into(),
        }
    }

    fn open_file_calls(host: &FakeHost) -> usize {
        host.calls()
            .iter()
            .filter(|c| matches!(c, HostCall::OpenFile { .. }))
            .count()
    }

    #[test]
    fn prefers_project_window() {
        let host = FakeHost::new();
        host.add_window(WindowId(1), None);
        host.open_in(WindowId(1), "/p/src/a.js");
        host.add_window(WindowId(2), Some("/p/p.sublime-project"));

        assert_eq!(resolve_target_window(&host, &request()), Some(WindowId(2)));
        assert_eq!(open_file_calls(&host), 0);
    }

    #[test]
    fn falls_back_to_window_with_file() {
        let host = FakeHost::new();
        host.add_window(WindowId(1), Some("/other/o.sublime-project"));
        host.add_window(WindowId(2), None);
        host.open_in(WindowId(2), "/p/src/a.js");

        assert_eq!(resolve_target_window(&host, &request()), Some(WindowId(2)));
        assert_eq!(open_file_calls(&host), 0);
    }

    #[test]
    fn opens_file_then_rescans() {
        let host = FakeHost::new();
        host.add_window(WindowId(1), None);
        host.set_opens_into(Some(WindowId(1)));

        assert_eq!(resolve_target_window(&host, &request()), Some(WindowId(1)));
        assert_eq!(
            host.calls(),
            vec![HostCall::OpenFile {
                path: "/p/src/a.js".into()
            }]
        );
    }

    #[test]
    fn unresolved_after_open() {
        let host = FakeHost::new();
        host.add_window(WindowId(1), None);

        assert_eq!(resolve_target_window(&host, &request()), None);
        assert_eq!(open_file_calls(&host), 1);
    }
}
