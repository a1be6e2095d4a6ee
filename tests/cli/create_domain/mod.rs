mod writes_template_contract;
