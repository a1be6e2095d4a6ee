mod creates_config_tree_contract;
mod rejects_when_already_initialized_contract;
