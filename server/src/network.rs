use crewbot_common::{
    laminar::{Config as NetworkConfig, Packet, Socket, SocketEvent},
    network::{make_packet, DeliveryType, ServerToGateway, EFFECT_STREAM},
};
use crossbeam_channel::{Receiver, Sender};
use std::{net::SocketAddr, thread::JoinHandle, time::Duration};

const BIND_ADDR: &str = "0.0.0.0:7800";

/// Binds the coordinator socket and moves polling onto its own thread.
/// Commands and connection events come back over the returned receiver.
pub fn spawn_network_thread() -> (Sender<Packet>, Receiver<SocketEvent>, JoinHandle<()>) {
    let mut socket = initialize_network();
    let (net_tx, net_rx) = (socket.get_packet_sender(), socket.get_event_receiver());

    let network_thread = std::thread::spawn(move || socket.start_polling());

    (net_tx, net_rx, network_thread)
}

fn initialize_network() -> Socket {
    // Chat traffic is bursty with long quiet stretches, so the gateway link
    // rides on heartbeats instead of a steady packet flow.
    let net_config = NetworkConfig {
        idle_connection_timeout: Duration::from_secs(30),
        heartbeat_interval: Some(Duration::from_secs(10)),
        ..NetworkConfig::default()
    };

    let socket =
        Socket::bind_with_config(BIND_ADDR, net_config).expect("Couldn't bind to server BIND_ADDR");

    tracing::info!("Listening on {:?}", BIND_ADDR);

    socket
}

/// All coordinator output rides the same reliable-ordered stream, so every
/// effect of a command reaches the gateway before the command's reply.
pub fn send_to_gateway(net_tx: &Sender<Packet>, addr: SocketAddr, message: &ServerToGateway) {
    let data = bincode::serialize(message).unwrap();
    let packet = make_packet(DeliveryType::ReliableOrdered, data, addr, EFFECT_STREAM);

    if let Err(e) = net_tx.send(packet) {
        tracing::error!("Failed to send packet: {:?}", e);
    }
}
