mod resolution_contract;
