// Tool Manager - Routes tool calls to the service that advertises them
use super::service_trait::ToolService;
use crate::{
    errors::{McpError, McpResult},
    mcp::McpTool,
};
use std::collections::HashMap;
use std::sync::Arc;

pub struct ToolManager {
    services: Vec<Arc<dyn ToolService>>,
    // Tool names are unqualified, so routing goes through a name -> service map
    // built at registration time.
    routes: HashMap<String, Arc<dyn ToolService>>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
            routes: HashMap::new(),
        }
    }

    pub fn register(&mut self, service: Arc<dyn ToolService>) {
        for tool in service.list_tools() {
            self.routes.insert(tool.name, service.clone());
        }
        self.services.push(service);
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// List all tools from all registered services
    pub fn list_all_tools(&self) -> Vec<McpTool> {
        let mut tools = Vec::new();
        for service in &self.services {
            tools.extend(service.list_tools());
        }
        tools
    }

    /// Call a tool by its advertised name
    pub async fn call_tool(&self, name: &str, args: serde_json::Value) -> McpResult<serde_json::Value> {
        let service = self
            .routes
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(format!("Tool not found: {name}")))?;

        service.call_tool(name, args).await
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct EchoService;

    #[async_trait]
    impl ToolService for EchoService {
        fn id(&self) -> &'static str {
            "echo"
        }

        fn list_tools(&self) -> Vec<McpTool> {
            vec![McpTool {
                name: "echo_text".to_string(),
                description: "Echo the input".to_string(),
                input_schema: None,
            }]
        }

        async fn call_tool(&self, _tool: &str, args: Value) -> McpResult<Value> {
            Ok(args)
        }
    }

    #[tokio::test]
    async fn routes_advertised_tool_to_its_service() {
        let mut manager = ToolManager::new();
        manager.register(Arc::new(EchoService));

        let result = manager.call_tool("echo_text", json!({"x": 1})).await.unwrap();
        assert_eq!(result, json!({"x": 1}));
    }

    #[tokio::test]
    async fn unknown_tool_name_is_an_error() {
        let manager = ToolManager::new();
        let err = manager.call_tool("missing", Value::Null).await.unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(_)));
    }

    #[test]
    fn lists_tools_from_all_services() {
        let mut manager = ToolManager::new();
        manager.register(Arc::new(EchoService));
        assert_eq!(manager.service_count(), 1);
        assert_eq!(manager.list_all_tools().len(), 1);
    }
}
