mod test_auth_flow;
mod test_gateway;
