pub mod document;

/// Caller-chosen handle for an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// Every document the caller currently has open, keyed by its own ids.
///
/// - Each [`document::Document`] owns exactly one engine.
/// - Opening under an id that is already in use closes the previous document
///   first.
/// - A failed open leaves the registry untouched.
#[derive(Debug, Default)]
pub struct Workspace {
    documents: std::collections::HashMap<DocumentId, document::Document>,
    config: editor_core::EngineConfig,
    window_size: usize,
}

impl Workspace {
    pub const DEFAULT_WINDOW_SIZE: usize = 200;

    #[must_use]
    pub fn new(config: editor_core::EngineConfig, window_size: usize) -> Self {
        Self {
            documents: std::collections::HashMap::new(),
            config,
            window_size: window_size.max(1),
        }
    }

    /// Opens `path` under `id`. Returns `false` (after logging why) if the
    /// file could not be opened.
    pub fn open(&mut self, id: DocumentId, path: impl AsRef<std::path::Path>) -> bool {
        let path = path.as_ref();

        match editor_core::Engine::open_with_config(path, self.config.clone()) {
            Ok(engine) => {
                let document = document::Document::new(engine, self.window_size());

                if let Some(previous) = self.documents.insert(id, document) {
                    previous.into_engine().close();
                }

                true
            }
            Err(err) => {
                tracing::warn!(?id, path = %path.display(), %err, "open failed");

                false
            }
        }
    }

    /// Closes the document under `id`, discarding unsaved edits.
    pub fn close(&mut self, id: DocumentId) -> bool {
        self.documents
            .remove(&id)
            .map(|document| document.into_engine().close())
            .is_some()
    }
}

/*

==========================
===== INLINE METHODS =====
==========================

*/

impl Workspace {
    #[inline]
    #[must_use]
    pub fn get(&self, id: DocumentId) -> Option<&document::Document> {
        self.documents.get(&id)
    }

    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut document::Document> {
        self.documents.get_mut(&id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn window_size(&self) -> usize {
        if self.window_size == 0 {
            Self::DEFAULT_WINDOW_SIZE
        } else {
            self.window_size
        }
    }

    /// Ids of open documents in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<DocumentId> {
        let mut ids: Vec<DocumentId> = self.documents.keys().copied().collect();
        ids.sort_unstable();

        ids
    }
}

#[cfg(test)]
mod workspace_tests {
    use super::{DocumentId, Workspace};
    use std::io::Write;

    fn temp_with(text: &str) -> tempfile::NamedTempFile {
        let mut temp = tempfile::NamedTempFile::new().unwrap();

        temp.write_all(text.as_bytes()).unwrap();
        temp.as_file().sync_all().unwrap();

        temp
    }

    #[test]
    fn default_workspace_uses_default_window() {
        let workspace = Workspace::default();

        assert!(workspace.is_empty());
        assert_eq!(workspace.window_size(), Workspace::DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn open_and_close_documents() {
        let first = temp_with("a\nb\nc\n");
        let second = temp_with("x\n");
        let mut workspace = Workspace::new(editor_core::EngineConfig::default(), 2);

        assert!(workspace.open(DocumentId(7), first.path()));
        assert!(workspace.open(DocumentId(3), second.path()));
        assert_eq!(workspace.ids(), [DocumentId(3), DocumentId(7)]);

        let doc = workspace.get(DocumentId(7)).unwrap();
        assert_eq!(doc.total_lines(), 3);
        assert_eq!(doc.lines(), ["a", "b"]);

        assert!(workspace.close(DocumentId(7)));
        assert!(!workspace.close(DocumentId(7)));
        assert_eq!(workspace.len(), 1);
    }

    #[test]
    fn failed_open_leaves_registry_unchanged() {
        let file = temp_with("kept\n");
        let dir = tempfile::tempdir().unwrap();
        let mut workspace = Workspace::default();

        assert!(workspace.open(DocumentId(1), file.path()));
        assert!(!workspace.open(DocumentId(1), dir.path().join("missing")));
        assert!(!workspace.open(DocumentId(2), dir.path()));

        assert_eq!(workspace.ids(), [DocumentId(1)]);
        assert_eq!(workspace.get(DocumentId(1)).unwrap().lines(), ["kept"]);
    }

    #[test]
    fn reopening_an_id_replaces_document() {
        let first = temp_with("old\n");
        let second = temp_with("new\nnewer\n");
        let mut workspace = Workspace::default();

        assert!(workspace.open(DocumentId(1), first.path()));
        assert!(workspace.open(DocumentId(1), second.path()));

        assert_eq!(workspace.len(), 1);
        assert_eq!(workspace.get(DocumentId(1)).unwrap().total_lines(), 2);
    }

    #[test]
    fn edits_go_through_get_mut() {
        let file = temp_with("one\ntwo\n");
        let mut workspace = Workspace::default();

        assert!(workspace.open(DocumentId(1), file.path()));

        let doc = workspace.get_mut(DocumentId(1)).unwrap();
        doc.edit(1, 1, "TWO").unwrap();

        assert_eq!(doc.lines(), ["one", "TWO"]);
        assert!(doc.is_dirty());
    }
}
