mod test_rest;
