//! Service descriptions for well-known port numbers.
//!
//! Purely informational: the description says what usually listens on a
//! port, not what was actually found there.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Static map of well-known TCP ports to human-readable descriptions.
static PORT_DESCRIPTIONS: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Legacy and diagnostic services
    m.insert(1, "(tcpmux) TCP port service multiplexer");
    m.insert(7, "(echo) Echo service");
    m.insert(9, "(discard) Null service for connection testing");
    m.insert(13, "(daytime) Date and time service");
    m.insert(17, "(qotd) Quote of the day");
    m.insert(19, "(chargen) Character generator");

    // File transfer, remote access and mail
    m.insert(20, "(ftp-data) FTP data channel");
    m.insert(21, "(ftp) File Transfer Protocol");
    m.insert(22, "(ssh) Secure Shell");
    m.insert(23, "(telnet) Telnet remote login");
    m.insert(25, "(smtp) Simple Mail Transfer Protocol");
    m.insert(37, "(time) Time Protocol");
    m.insert(43, "(whois) WHOIS directory service");
    m.insert(53, "(domain) Domain Name System");
    m.insert(67, "(bootps) BOOTP/DHCP server");
    m.insert(68, "(bootpc) BOOTP/DHCP client");
    m.insert(69, "(tftp) Trivial File Transfer Protocol");
    m.insert(70, "(gopher) Gopher document retrieval");
    m.insert(79, "(finger) User information lookup");
    m.insert(80, "(http) HyperText Transfer Protocol");
    m.insert(88, "(kerberos) Kerberos authentication");
    m.insert(110, "(pop3) Post Office Protocol v3");
    m.insert(111, "(sunrpc) ONC RPC portmapper");
    m.insert(113, "(auth) Ident authentication service");
    m.insert(119, "(nntp) Network News Transfer Protocol");
    m.insert(123, "(ntp) Network Time Protocol");
    m.insert(135, "(msrpc) Microsoft RPC endpoint mapper");
    m.insert(137, "(netbios-ns) NetBIOS name service");
    m.insert(138, "(netbios-dgm) NetBIOS datagram service");
    m.insert(139, "(netbios-ssn) NetBIOS session service");
    m.insert(143, "(imap) Internet Message Access Protocol");
    m.insert(161, "(snmp) Simple Network Management Protocol");
    m.insert(162, "(snmptrap) SNMP traps");
    m.insert(179, "(bgp) Border Gateway Protocol");
    m.insert(194, "(irc) Internet Relay Chat");
    m.insert(389, "(ldap) Lightweight Directory Access Protocol");
    m.insert(427, "(svrloc) Service Location Protocol");
    m.insert(443, "(https) HTTP over TLS");
    m.insert(445, "(microsoft-ds) SMB over TCP");
    m.insert(464, "(kpasswd) Kerberos password change");
    m.insert(465, "(smtps) SMTP over TLS");
    m.insert(500, "(isakmp) IPsec key exchange");
    m.insert(512, "(exec) Remote process execution");
    m.insert(513, "(login) Remote login");
    m.insert(514, "(shell) Remote shell");
    m.insert(515, "(printer) Line printer daemon");
    m.insert(548, "(afp) Apple Filing Protocol");
    m.insert(554, "(rtsp) Real Time Streaming Protocol");
    m.insert(587, "(submission) Mail message submission");
    m.insert(631, "(ipp) Internet Printing Protocol");
    m.insert(636, "(ldaps) LDAP over TLS");
    m.insert(873, "(rsync) rsync file synchronisation");
    m.insert(993, "(imaps) IMAP over TLS");
    m.insert(995, "(pop3s) POP3 over TLS");

    // Registered ports
    m.insert(1080, "(socks) SOCKS proxy");
    m.insert(1194, "(openvpn) OpenVPN");
    m.insert(1433, "(ms-sql-s) Microsoft SQL Server");
    m.insert(1521, "(oracle) Oracle database listener");
    m.insert(1723, "(pptp) Point-to-Point Tunneling Protocol");
    m.insert(1883, "(mqtt) MQTT message broker");
    m.insert(2049, "(nfs) Network File System");
    m.insert(2375, "(docker) Docker API");
    m.insert(2376, "(docker-s) Docker API over TLS");
    m.insert(3128, "(squid) Squid HTTP proxy");
    m.insert(3306, "(mysql) MySQL database");
    m.insert(3389, "(ms-wbt-server) Remote Desktop Protocol");
    m.insert(5060, "(sip) Session Initiation Protocol");
    m.insert(5432, "(postgresql) PostgreSQL database");
    m.insert(5672, "(amqp) AMQP message broker");
    m.insert(5900, "(vnc) Virtual Network Computing");
    m.insert(6379, "(redis) Redis key-value store");
    m.insert(6443, "(kube-apiserver) Kubernetes API server");
    m.insert(8080, "(http-alt) Alternate HTTP / proxy");
    m.insert(8443, "(https-alt) Alternate HTTPS");
    m.insert(9092, "(kafka) Apache Kafka broker");
    m.insert(9200, "(elasticsearch) Elasticsearch REST API");
    m.insert(11211, "(memcache) Memcached");
    m.insert(27017, "(mongodb) MongoDB database");

    m
});

/// Describe the service registered for `port`.
///
/// Returns an empty string when the port is not registered.
pub fn service_description(port: u16) -> &'static str {
    PORT_DESCRIPTIONS.get(&port).copied().unwrap_or("")
}
