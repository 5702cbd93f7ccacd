// Tool dispatch - trait and registry for tool-providing services
pub mod manager;
pub mod service_trait;

pub use manager::ToolManager;
pub use service_trait::ToolService;
