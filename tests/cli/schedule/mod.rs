mod sigterm_drains_contract;
