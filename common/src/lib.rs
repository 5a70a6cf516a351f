pub mod aws_clients;
pub mod config;
pub mod deserializers;
pub mod ec2;
pub mod test_tools;
