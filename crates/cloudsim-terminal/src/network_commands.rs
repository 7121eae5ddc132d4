//! Simulated network commands: ping, ifconfig, netstat, curl, wget.
//!
//! Nothing here touches a real network. Addresses, latencies and page sizes
//! are derived from a SHA-256 digest of the host so output is stable for a
//! given input.

use std::net::Ipv4Addr;

use sha2::{Digest, Sha256};

use cloudsim_types::config::MAX_PING_COUNT;
use cloudsim_types::error::{Result, SimError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register network commands.
pub fn register_network_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(PingCmd));
    reg.register(Box::new(IfconfigCmd));
    reg.register(Box::new(NetstatCmd));
    reg.register(Box::new(CurlCmd));
    reg.register(Box::new(WgetCmd));
}

fn digest(input: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(input.as_bytes()));
    out
}

fn is_valid_hostname(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 253
        && host.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Resolve a host to a simulated IPv4 address.
///
/// Literal addresses resolve to themselves and `localhost` to loopback.
/// Anything else gets a stable public-looking address.
fn resolve(host: &str) -> Option<Ipv4Addr> {
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Some(addr);
    }
    if host == "localhost" {
        return Some(Ipv4Addr::LOCALHOST);
    }
    if !is_valid_hostname(host) {
        return None;
    }
    let d = digest(host);
    let mut first = 1 + d[0] % 222;
    if first == 10 || first == 127 {
        first += 1;
    }
    Some(Ipv4Addr::new(first, d[1], d[2], d[3].max(1)))
}

/// Round-trip time in milliseconds for echo `seq` to `addr`.
fn latency_ms(host: &str, addr: Ipv4Addr, seq: u32) -> f64 {
    if addr.is_loopback() {
        return 0.03 + f64::from(seq % 4) * 0.01;
    }
    let d = digest(host);
    let base = 5.0 + f64::from(u16::from_be_bytes([d[4], d[5]]) % 80);
    let jitter = f64::from(d[6 + (seq as usize % 20)]) / 64.0;
    base + jitter
}

/// The parts of an http(s) URL the simulated clients care about.
#[derive(Debug, PartialEq)]
struct Url<'a> {
    https: bool,
    host: &'a str,
    port: Option<u16>,
    path: &'a str,
}

impl Url<'_> {
    fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(if self.https { 443 } else { 80 })
    }
}

/// Split `scheme://[user@]host[:port]/path`. A missing scheme means plain
/// http and a missing path means `/`.
fn split_url(url: &str) -> Option<Url<'_>> {
    let (https, rest) = if let Some(rest) = url.strip_prefix("https://") {
        (true, rest)
    } else {
        (false, url.strip_prefix("http://").unwrap_or(url))
    };
    let (authority, path) = match rest.find(['/', '?', '#']) {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let (host, port) = match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port.parse::<u16>().ok().filter(|p| *p != 0)?)),
        None => (host_port, None),
    };
    Some(Url {
        https,
        host,
        port,
        path,
    })
}

/// Parse `url` and resolve its host, reporting failures as `cmd` would.
fn fetch_target<'a>(cmd: &str, url: &'a str) -> Result<(Url<'a>, Ipv4Addr)> {
    let parsed = split_url(url).ok_or_else(|| {
        SimError::InvalidArgument(format!("{cmd}: URL using bad/illegal format: {url}"))
    })?;
    let addr = resolve(parsed.host).ok_or_else(|| unresolvable(cmd, parsed.host))?;
    Ok((parsed, addr))
}

/// Body served for `host` + `path`.
fn page_body(host: &str, path: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{host}</title></head>\n<body>\n<h1>{host}</h1>\n<p>Simulated response for {path}</p>\n</body>\n</html>"
    )
}

fn unresolvable(cmd: &str, host: &str) -> SimError {
    SimError::InvalidArgument(format!("{cmd}: could not resolve host: {host}"))
}

// ---------------------------------------------------------------------------
// ping
// ---------------------------------------------------------------------------

struct PingCmd;
impl Command for PingCmd {
    fn name(&self) -> &str {
        "ping"
    }
    fn description(&self) -> &str {
        "Send ICMP echo requests to a host"
    }
    fn usage(&self) -> &str {
        "ping <host>"
    }
    fn category(&self) -> &str {
        "network"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 1, 1)?;
        let host = args[0];
        let addr = resolve(host).ok_or_else(|| {
            SimError::InvalidArgument(format!("ping: {host}: Name or service not known"))
        })?;
        let ttl = if addr.is_loopback() { 64 } else { 117 };
        let count = env.config.ping_count.clamp(1, MAX_PING_COUNT);

        let mut lines = vec![format!("PING {host} ({addr}) 56(84) bytes of data.")];
        let times: Vec<f64> = (1..=count).map(|seq| latency_ms(host, addr, seq)).collect();
        for (seq, t) in (1..=count).zip(&times) {
            lines.push(format!(
                "64 bytes from {host} ({addr}): icmp_seq={seq} ttl={ttl} time={t:.1} ms"
            ));
        }

        let n = times.len() as f64;
        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = times.iter().sum::<f64>() / n;
        let mdev = (times.iter().map(|t| (t - avg).powi(2)).sum::<f64>() / n).sqrt();

        lines.push(String::new());
        lines.push(format!("--- {host} ping statistics ---"));
        lines.push(format!(
            "{count} packets transmitted, {count} received, 0% packet loss, time {}ms",
            count.saturating_sub(1) * 1000
        ));
        lines.push(format!(
            "rtt min/avg/max/mdev = {min:.3}/{avg:.3}/{max:.3}/{mdev:.3} ms"
        ));
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// ifconfig
// ---------------------------------------------------------------------------

const IFCONFIG_TEXT: &str = "\
eth0: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500
        inet 10.0.2.15  netmask 255.255.255.0  broadcast 10.0.2.255
        ether 02:42:0a:00:02:0f  txqueuelen 1000  (Ethernet)
        RX packets 18342  bytes 21876543 (20.8 MiB)
        TX packets 9271  bytes 1204887 (1.1 MiB)

lo: flags=73<UP,LOOPBACK,RUNNING>  mtu 65536
        inet 127.0.0.1  netmask 255.0.0.0
        loop  txqueuelen 1000  (Local Loopback)
        RX packets 412  bytes 35120 (34.2 KiB)
        TX packets 412  bytes 35120 (34.2 KiB)";

struct IfconfigCmd;
impl Command for IfconfigCmd {
    fn name(&self) -> &str {
        "ifconfig"
    }
    fn description(&self) -> &str {
        "Show network interfaces"
    }
    fn usage(&self) -> &str {
        "ifconfig"
    }
    fn category(&self) -> &str {
        "network"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 0, 0)?;
        Ok(CommandOutput::Text(IFCONFIG_TEXT.to_string()))
    }
}

// ---------------------------------------------------------------------------
// netstat
// ---------------------------------------------------------------------------

struct NetstatCmd;
impl Command for NetstatCmd {
    fn name(&self) -> &str {
        "netstat"
    }
    fn description(&self) -> &str {
        "Show network connections"
    }
    fn usage(&self) -> &str {
        "netstat"
    }
    fn category(&self) -> &str {
        "network"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 0, 0)?;
        let rows: Vec<Vec<String>> = [
            ["tcp", "0.0.0.0:22", "0.0.0.0:*", "LISTEN"],
            ["tcp", "127.0.0.1:5432", "0.0.0.0:*", "LISTEN"],
            ["tcp", "10.0.2.15:22", "10.0.2.2:51514", "ESTABLISHED"],
            ["tcp", "10.0.2.15:40312", "140.82.112.3:443", "TIME_WAIT"],
            ["udp", "0.0.0.0:68", "0.0.0.0:*", ""],
        ]
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();
        Ok(CommandOutput::table(
            &["PROTO", "LOCAL ADDRESS", "FOREIGN ADDRESS", "STATE"],
            rows,
        ))
    }
}

// ---------------------------------------------------------------------------
// curl
// ---------------------------------------------------------------------------

struct CurlCmd;
impl Command for CurlCmd {
    fn name(&self) -> &str {
        "curl"
    }
    fn description(&self) -> &str {
        "Fetch a URL and print the response body"
    }
    fn usage(&self) -> &str {
        "curl <url>"
    }
    fn category(&self) -> &str {
        "network"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 1, 1)?;
        let (url, _) = fetch_target("curl", args[0])?;
        Ok(CommandOutput::Text(page_body(url.host, url.path)))
    }
}

// ---------------------------------------------------------------------------
// wget
// ---------------------------------------------------------------------------

/// Local file name `wget` saves `path` to.
fn output_name(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "index.html",
    }
}

struct WgetCmd;
impl Command for WgetCmd {
    fn name(&self) -> &str {
        "wget"
    }
    fn description(&self) -> &str {
        "Download a URL"
    }
    fn usage(&self) -> &str {
        "wget <url>"
    }
    fn category(&self) -> &str {
        "network"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 1, 1)?;
        let (target, addr) = fetch_target("wget", args[0])?;
        let (host, path) = (target.host, target.path);
        let port = target.port_or_default();
        let file = output_name(path);
        let len = page_body(host, path).len();
        let now = env.clock.now();

        Ok(CommandOutput::Text(format!(
            "--{now}--  {url}\n\
             Resolving {host}... {addr}\n\
             Connecting to {host}|{addr}|:{port}... connected.\n\
             HTTP request sent, awaiting response... 200 OK\n\
             Length: {len} [text/html]\n\
             Saving to: '{file}'\n\
             \n\
             {file}  100%[===================>]  {len}  --.-KB/s  in 0s\n\
             \n\
             {now} - '{file}' saved [{len}/{len}]",
            url = args[0]
        )))
    }
}
