use mockito::ServerGuard;

/// Splits the address of a mock server into the host and port an inverter is configured with.
pub fn host_and_port(server: &ServerGuard) -> (String, u16) {
    let host_with_port = server.host_with_port();
    let (host, port) = host_with_port.rsplit_once(':').expect("mock server address has a port");
    (host.to_string(), port.parse().expect("mock server port is numeric"))
}
