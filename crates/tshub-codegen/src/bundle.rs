//! Per-hub output bundle.
//!
//! A [`HubBundle`] is the complete, in-memory result of generating one hub.
//! Its content is fully determined before any file is written, so the
//! driver may write the files in any order or concurrently.

use camino::Utf8PathBuf;

use crate::registry::Declaration;

/// One file to be written, relative to the output folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output folder.
    pub path: Utf8PathBuf,
    /// File contents.
    pub contents: String,
}

impl GeneratedFile {
    /// Creates a generated file.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// React context provider and hook for a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    /// `<Class>Context.tsx` contents.
    pub context: String,
    /// `<Class>ContextHook.tsx` contents.
    pub hook: String,
}

/// Everything generated for one hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubBundle {
    /// Fully-qualified name of the hub type.
    pub hub: String,
    /// Generated proxy class name.
    pub class_name: String,
    /// Proxy class source.
    pub proxy: String,
    /// Declarations reachable from the hub's signatures, in completion order.
    pub declarations: Vec<Declaration>,
    /// Directory (relative to the proxy) that declarations are written to.
    pub types_dir: String,
    /// Optional React scaffolding.
    pub scaffold: Option<Scaffold>,
}

impl HubBundle {
    /// Returns every file of the bundle with its relative path.
    ///
    /// The proxy comes first, then declarations, then scaffolding.
    ///
    /// # Examples
    ///
    /// ```
    /// use tshub_codegen::HubBundle;
    ///
    /// let bundle = HubBundle {
    ///     hub: "Demo.ChatHub".to_owned(),
    ///     class_name: "ChatHubClient".to_owned(),
    ///     proxy: String::new(),
    ///     declarations: Vec::new(),
    ///     types_dir: "types".to_owned(),
    ///     scaffold: None,
    /// };
    /// let paths: Vec<_> = bundle.files().into_iter().map(|f| f.path.into_string()).collect();
    /// assert_eq!(paths, vec!["ChatHubClient.ts"]);
    /// ```
    #[must_use]
    pub fn files(&self) -> Vec<GeneratedFile> {
        let mut files = Vec::with_capacity(self.declarations.len() + 3);

        files.push(GeneratedFile::new(
            format!("{}.ts", self.class_name),
            self.proxy.as_str(),
        ));

        let types_dir = Utf8PathBuf::from(&self.types_dir);
        files.extend(self.declarations.iter().map(|declaration| {
            GeneratedFile::new(
                types_dir.join(format!("{}.ts", declaration.name)),
                declaration.text.as_str(),
            )
        }));

        if let Some(scaffold) = &self.scaffold {
            files.push(GeneratedFile::new(
                format!("{}Context.tsx", self.class_name),
                scaffold.context.as_str(),
            ));
            files.push(GeneratedFile::new(
                format!("{}ContextHook.tsx", self.class_name),
                scaffold.hook.as_str(),
            ));
        }

        files
    }
}
