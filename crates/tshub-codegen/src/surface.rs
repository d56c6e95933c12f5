//! Proxy class rendering.
//!
//! Renders a [`ProxyDescriptor`] as a TypeScript class wrapping a SignalR
//! `HubConnection`: one async invoke wrapper per hub method and one
//! subscribe/unsubscribe pair per client callback.
//!
//! ```text
//! import type { HubConnection } from "@microsoft/signalr";
//!
//! import type { Order } from "./types/Order";
//!
//! export class ShopHubClient {
//!   readonly connection: HubConnection;
//!   ...
//! }
//! ```

use tshub_core::{CallbackSignature, GeneratorConfig, MethodSignature, Parameter, ProxyDescriptor};

/// Renders the proxy class source for one hub.
///
/// Import paths point at `./<types_dir>/<Name>`. Sections without entries
/// are omitted along with their separating blank line.
///
/// # Examples
///
/// ```
/// use tshub_codegen::render_proxy;
/// use tshub_core::{GeneratorConfig, ProxyDescriptor};
///
/// let proxy = ProxyDescriptor::new("EmptyHubClient", Vec::new(), Vec::new());
/// let text = render_proxy(&proxy, &GeneratorConfig::default());
/// assert!(text.starts_with("import type { HubConnection } from \"@microsoft/signalr\";\n\n"));
/// assert!(text.contains("export class EmptyHubClient {\n"));
/// assert!(text.ends_with("  }\n}\n"));
/// ```
#[must_use]
pub fn render_proxy(proxy: &ProxyDescriptor, config: &GeneratorConfig) -> String {
    let mut output = format!(
        "import type {{ HubConnection }} from \"{}\";\n\n",
        config.transport_module
    );

    if !proxy.imports.is_empty() {
        for name in &proxy.imports {
            output.push_str(&format!(
                "import type {{ {name} }} from \"./{}/{name}\";\n",
                config.types_dir
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("export class {} {{\n", proxy.class_name));
    output.push_str("  readonly connection: HubConnection;\n\n");
    output.push_str("  constructor(hubConnection: HubConnection) {\n");
    output.push_str("    this.connection = hubConnection;\n");
    output.push_str("  }\n");

    for method in &proxy.methods {
        output.push('\n');
        render_method(&mut output, method);
    }
    for callback in &proxy.callbacks {
        output.push('\n');
        render_callback(&mut output, callback);
    }

    output.push_str("}\n");
    output
}

fn render_method(output: &mut String, method: &MethodSignature) {
    let name = &method.target_name;
    let parameters = parameter_list(&method.parameters);
    let arguments = std::iter::once(format!("\"{}\"", method.wire_name))
        .chain(method.parameters.iter().map(|p| p.name.clone()))
        .collect::<Vec<_>>()
        .join(", ");

    match &method.return_type {
        Some(return_type) => {
            output.push_str(&format!(
                "  async {name}({parameters}): Promise<{return_type}> {{\n"
            ));
            output.push_str(&format!(
                "    return await this.connection.invoke<{return_type}>({arguments});\n"
            ));
        }
        None => {
            output.push_str(&format!("  async {name}({parameters}) {{\n"));
            output.push_str(&format!("    await this.connection.invoke({arguments});\n"));
        }
    }
    output.push_str("  }\n");
}

fn render_callback(output: &mut String, callback: &CallbackSignature) {
    let parameters = parameter_list(&callback.parameters);
    let wire_name = &callback.wire_name;

    output.push_str(&format!(
        "  {}(callback: ({parameters}) => void): void {{\n",
        callback.add_handler_name()
    ));
    output.push_str(&format!("    this.connection.on(\"{wire_name}\", callback);\n"));
    output.push_str("  }\n\n");

    output.push_str(&format!(
        "  {}(callback: ({parameters}) => void): void {{\n",
        callback.remove_handler_name()
    ));
    output.push_str(&format!("    this.connection.off(\"{wire_name}\", callback);\n"));
    output.push_str("  }\n");
}

fn parameter_list(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect::<Vec<_>>()
        .join(", ")
}
