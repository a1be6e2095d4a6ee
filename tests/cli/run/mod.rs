mod copies_dataset_contract;
mod dry_run_contract;
mod failure_exit_code_contract;
mod selection_contract;
