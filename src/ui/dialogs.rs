use rfd::FileDialog;
use std::path::PathBuf;

/// File dialog helper for picking recorded samples
pub struct FileDialogs;

impl FileDialogs {
    /// Open a file dialog for selecting a recorded traffic CSV
    pub fn open_samples_file() -> Option<PathBuf> {
        FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .add_filter("All Files", &["*"])
            .set_title("Open Traffic Samples")
            .pick_file()
    }
}
