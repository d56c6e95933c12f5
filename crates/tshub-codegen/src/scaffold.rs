//! React scaffolding around a generated proxy.
//!
//! Both files depend only on the proxy class name; the context also imports
//! from the same transport module as the proxy.

use tshub_core::to_camel_case;

/// Renders `<Class>Context.tsx`: a context provider that owns one proxy
/// instance and starts its connection when disconnected.
///
/// # Examples
///
/// ```
/// use tshub_codegen::render_react_context;
///
/// let text = render_react_context("ChatHubClient", "@microsoft/signalr");
/// assert!(text.contains("import { ChatHubClient } from \"./ChatHubClient\";"));
/// assert!(text.contains("const chatHubClient = useRef(new ChatHubClient(connection));"));
/// ```
#[must_use]
pub fn render_react_context(class_name: &str, transport_module: &str) -> String {
    let variable = to_camel_case(class_name);
    format!(
        r#"import {{ HubConnection, HubConnectionState }} from "{transport_module}";
import {{ createContext, ReactNode, useEffect, useRef }} from "react";
import {{ {class_name} }} from "./{class_name}";

export type {class_name}ContextProviderProps = {{
  children: ReactNode;
  hubConnection: HubConnection | (() => HubConnection);
}};

export const {class_name}Context = createContext<{{ hub: {class_name} }} | undefined>(undefined);

export const {class_name}ContextProvider = ({{ children, hubConnection }}: {class_name}ContextProviderProps) => {{
  const connection = typeof hubConnection === "function" ? hubConnection() : hubConnection;

  const {variable} = useRef(new {class_name}(connection));

  useEffect(() => {{
    if ({variable}.current.connection.state === HubConnectionState.Disconnected) {{
      {variable}.current.connection.start().catch((err) => console.error(err));
    }}
  }}, [{variable}.current.connection.state]);

  return <{class_name}Context.Provider value={{{{ hub: {variable}.current }}}}>{{children}}</{class_name}Context.Provider>;
}};
"#
    )
}

/// Renders `<Class>ContextHook.tsx`: the `use<Class>` accessor for the
/// context created by [`render_react_context`].
///
/// # Examples
///
/// ```
/// use tshub_codegen::render_context_hook;
///
/// let text = render_context_hook("ChatHubClient");
/// assert!(text.contains("export const useChatHubClient = () => {"));
/// ```
#[must_use]
pub fn render_context_hook(class_name: &str) -> String {
    format!(
        r#"import {{ useContext }} from "react";
import {{ {class_name}Context }} from "./{class_name}Context";

export const use{class_name} = () => {{
  const context = useContext({class_name}Context);

  if (context === undefined) {{
    throw Error("Context undefined? Forgot a provider somewhere?");
  }}

  return context;
}};
"#
    )
}
