// Adapters layer: concrete implementations for external systems. The only
// collaborator here is the local gateway bridge that fronts WhatsApp.

pub mod gateway;
