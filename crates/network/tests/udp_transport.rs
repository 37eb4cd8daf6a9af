use std::{
    net::{Ipv4Addr, SocketAddr, UdpSocket},
    time::Duration,
};

use milight_network::{
    core::proto::{types::Group, Command},
    Transport, UdpTransport,
};

fn create_loopback() -> anyhow::Result<(UdpTransport, UdpSocket)> {
    let _ = env_logger::try_init();

    let bridge = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0))?;
    bridge.set_read_timeout(Some(Duration::from_secs(5)))?;

    let transport = UdpTransport::open(bridge.local_addr()?)?;
    Ok((transport, bridge))
}

fn receive(bridge: &UdpSocket) -> Vec<u8> {
    let mut buf = [0_u8; 64];
    let (len, _) = bridge.recv_from(&mut buf).unwrap();
    buf[..len].to_vec()
}

#[test]
fn test_send_commands() {
    let (mut transport, bridge) = create_loopback().unwrap();

    transport.send(Command::on(Group::One)).unwrap();
    transport.send(Command::brightness(15)).unwrap();

    assert_eq!(receive(&bridge), [0x45, 0x00, 0x55]);
    assert_eq!(receive(&bridge), [0x4E, 0x0F, 0x55]);
}

#[test]
fn test_send_through_reference() {
    let (mut transport, bridge) = create_loopback().unwrap();

    let mut transport_ref = &mut transport;
    Transport::send(&mut transport_ref, Command::disco_on()).unwrap();
    assert_eq!(receive(&bridge), Command::disco_on().to_bytes());
}

#[test]
fn test_transport_address() {
    let address = SocketAddr::from((Ipv4Addr::LOCALHOST, 8899));
    let transport = UdpTransport::open(address).unwrap();
    assert_eq!(transport.address(), address);
}
