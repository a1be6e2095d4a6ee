mod reports_field_paths_contract;
