mod json_output_contract;
