//! Writes generated bundles to disk.
//!
//! Every file of a bundle is fully rendered before writing starts, so the
//! files are written concurrently with no ordering between them. Directories
//! are created up front. Bundles are written one after another.

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::eyre::WrapErr;
use futures_util::future::try_join_all;
use tracing::{debug, error, info};
use tshub_codegen::{GenerateError, HubBundle};

/// What happened to each hub of a generation run.
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Hubs whose files were all written, with the paths.
    pub written: Vec<(String, Vec<Utf8PathBuf>)>,
    /// Hubs that failed to generate or to write, with the reason.
    pub failures: Vec<(String, String)>,
}

/// Writes every successful bundle and records every failure.
///
/// A bundle that cannot be written does not stop the bundles after it.
pub async fn write_results(
    output_dir: &Utf8Path,
    results: Vec<(String, Result<HubBundle, GenerateError>)>,
) -> WriteSummary {
    let mut summary = WriteSummary::default();

    for (hub, result) in results {
        let bundle = match result {
            Ok(bundle) => bundle,
            Err(e) => {
                error!(
                    hub = %hub,
                    kind = e.kind(),
                    type_name = e.type_name(),
                    "Hub generation failed"
                );
                summary.failures.push((hub, e.to_string()));
                continue;
            }
        };

        match write_bundle(output_dir, &bundle).await {
            Ok(written) => {
                info!(
                    hub = %hub,
                    class = %bundle.class_name,
                    files = written.len(),
                    "Wrote hub client"
                );
                summary.written.push((hub, written));
            }
            Err(e) => {
                error!(hub = %hub, error = %e, "Failed to write hub client");
                summary.failures.push((hub, format!("{e:#}")));
            }
        }
    }

    summary
}

/// Writes all files of `bundle` under `output_dir`.
///
/// Returns the paths written, in bundle order.
///
/// # Errors
///
/// Returns an error naming the directory or file that could not be written.
pub async fn write_bundle(
    output_dir: &Utf8Path,
    bundle: &HubBundle,
) -> color_eyre::Result<Vec<Utf8PathBuf>> {
    let files = bundle.files();

    let mut dirs: Vec<Utf8PathBuf> = Vec::new();
    for file in &files {
        let dir = file
            .path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .map_or_else(|| output_dir.to_owned(), |parent| output_dir.join(parent));
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    for dir in &dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .wrap_err_with(|| format!("Failed to create directory {dir}"))?;
    }

    let writes = files.iter().map(|file| async move {
        let path = output_dir.join(&file.path);
        tokio::fs::write(&path, file.contents.as_bytes())
            .await
            .wrap_err_with(|| format!("Failed to write {path}"))?;
        debug!(path = %path, bytes = file.contents.len(), "Wrote file");
        Ok::<_, color_eyre::Report>(path)
    });

    try_join_all(writes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tshub_codegen::{Declaration, DeclarationKind, Scaffold};

    fn bundle(scaffold: Option<Scaffold>) -> HubBundle {
        HubBundle {
            hub: "Demo.ChatHub".to_owned(),
            class_name: "ChatHubClient".to_owned(),
            proxy: "export class ChatHubClient {}\n".to_owned(),
            declarations: vec![Declaration {
                name: "Message".to_owned(),
                qualified_name: "Demo.Message".to_owned(),
                kind: DeclarationKind::Object,
                references: Vec::new(),
                text: "export type Message = {\n  text: string;\n};\n".to_owned(),
            }],
            types_dir: "types".to_owned(),
            scaffold,
        }
    }

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[tokio::test]
    async fn test_write_bundle_creates_layout() {
        let (_guard, root) = temp_root();
        let output = root.join("generated");

        let written = write_bundle(&output, &bundle(None)).await.unwrap();
        assert_eq!(
            written,
            vec![
                output.join("ChatHubClient.ts"),
                output.join("types").join("Message.ts"),
            ]
        );

        let message = std::fs::read_to_string(output.join("types/Message.ts")).unwrap();
        assert_eq!(message, "export type Message = {\n  text: string;\n};\n");
        let proxy = std::fs::read_to_string(output.join("ChatHubClient.ts")).unwrap();
        assert_eq!(proxy, "export class ChatHubClient {}\n");
    }

    #[tokio::test]
    async fn test_write_bundle_with_scaffold() {
        let (_guard, root) = temp_root();
        let scaffold = Scaffold {
            context: "context".to_owned(),
            hook: "hook".to_owned(),
        };

        let written = write_bundle(&root, &bundle(Some(scaffold))).await.unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(
            std::fs::read_to_string(root.join("ChatHubClientContextHook.tsx")).unwrap(),
            "hook"
        );
    }

    #[tokio::test]
    async fn test_write_results_continues_past_failures() {
        let (_guard, root) = temp_root();
        // A directory where the first proxy file should go.
        std::fs::create_dir(root.join("ChatHubClient.ts")).unwrap();

        let mut shop = bundle(None);
        shop.hub = "Demo.ShopHub".to_owned();
        shop.class_name = "ShopHubClient".to_owned();
        shop.proxy = "export class ShopHubClient {}\n".to_owned();

        let results = vec![
            ("Demo.ChatHub".to_owned(), Ok(bundle(None))),
            (
                "Demo.BrokenHub".to_owned(),
                Err(GenerateError::UnmappablePrimitive {
                    type_name: "System.IntPtr".to_owned(),
                }),
            ),
            ("Demo.ShopHub".to_owned(), Ok(shop)),
        ];
        let summary = write_results(&root, results).await;

        let failed: Vec<_> = summary.failures.iter().map(|(hub, _)| hub.as_str()).collect();
        assert_eq!(failed, vec!["Demo.ChatHub", "Demo.BrokenHub"]);
        assert!(summary.failures[0].1.contains("ChatHubClient.ts"));
        assert!(summary.failures[1].1.contains("System.IntPtr"));

        assert_eq!(summary.written.len(), 1);
        assert_eq!(summary.written[0].0, "Demo.ShopHub");
        assert_eq!(
            std::fs::read_to_string(root.join("ShopHubClient.ts")).unwrap(),
            "export class ShopHubClient {}\n"
        );
    }

    #[tokio::test]
    async fn test_write_bundle_overwrites_existing_files() {
        let (_guard, root) = temp_root();
        std::fs::write(root.join("ChatHubClient.ts"), "stale contents that are longer").unwrap();

        write_bundle(&root, &bundle(None)).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(root.join("ChatHubClient.ts")).unwrap(),
            "export class ChatHubClient {}\n"
        );
    }
}
