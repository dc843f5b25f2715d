/// File categorization by extension.
///
/// This module maps a file extension to one of a fixed set of categories
/// (e.g. "Images", "Documents"). The table is closed: an extension that is not
/// listed has no category and the file is left where it is.
///
/// # Examples
///
/// ```
/// use filesorter::file_category::{Category, classify};
///
/// assert_eq!(classify(".png"), Some(Category::Images));
/// assert_eq!(classify("MP3"), Some(Category::Music));
/// assert_eq!(classify(".xyz"), None);
/// ```
use std::fmt;

/// A category a recognized file is sorted into.
///
/// The declaration order is also the order categories are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// jpg, jpeg, png, gif, heic, svg
    Images,
    /// mp4, avi, mov
    Videos,
    /// mp3, wav
    Music,
    /// txt, pdf, docx, doc, xlsx
    Documents,
    /// epub
    Books,
    /// zip, rar, tar
    Archives,
    /// json, sql
    Codes,
}

impl Category {
    /// Every category, in reporting order.
    pub const ALL: [Category; 7] = [
        Category::Images,
        Category::Videos,
        Category::Music,
        Category::Documents,
        Category::Books,
        Category::Archives,
        Category::Codes,
    ];

    /// Returns the directory name (and display label) for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use filesorter::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Codes.dir_name(), "Codes");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Music => "Music",
            Category::Documents => "Documents",
            Category::Books => "Books",
            Category::Archives => "Archives",
            Category::Codes => "Codes",
        }
    }

    /// Looks up the category of a lowercase extension without the leading dot.
    fn from_normalized(ext: &str) -> Option<Self> {
        let category = match ext {
            "jpg" | "jpeg" | "png" | "gif" | "heic" | "svg" => Category::Images,
            "mp4" | "avi" | "mov" => Category::Videos,
            "mp3" | "wav" => Category::Music,
            "txt" | "pdf" | "docx" | "doc" | "xlsx" => Category::Documents,
            "epub" => Category::Books,
            "zip" | "rar" | "tar" => Category::Archives,
            "json" | "sql" => Category::Codes,
            _ => return None,
        };
        Some(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Maps a file extension to its category.
///
/// The comparison is case-insensitive and a single leading dot is ignored,
/// so `".JPG"`, `"jpg"` and `".jpg"` all classify as [`Category::Images`].
/// Returns `None` for anything not in the table, including the empty string.
pub fn classify(extension: &str) -> Option<Category> {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    Category::from_normalized(&ext.to_lowercase())
}

/// Returns the extension of a file name, without the dot.
///
/// The extension is everything after the last `.`, even when that dot is the
/// first character: `".txt"` has extension `"txt"`. This differs from
/// [`std::path::Path::extension`], which treats such names as extensionless.
///
/// ```
/// use filesorter::file_category::extension_of;
///
/// assert_eq!(extension_of("photo.JPG"), Some("JPG"));
/// assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
/// assert_eq!(extension_of(".txt"), Some("txt"));
/// assert_eq!(extension_of("README"), None);
/// ```
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|idx| &file_name[idx + 1..])
}
