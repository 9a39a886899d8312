use crate::controller::Controller;
use crewbot_common::{
    laminar::SocketEvent,
    network::{
        CommandOrigin, DeleteMessagePacket, GatewayToServer, ReplyPacket, ServerToGateway,
        PROTOCOL_VERSION,
    },
};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod controller;
mod network;

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (net_tx, net_rx, _network_thread) = network::spawn_network_thread();
    let mut controller = Controller::new();

    while let Ok(event) = net_rx.recv() {
        match event {
            SocketEvent::Packet(packet) => {
                let msg = packet.payload();

                match bincode::deserialize::<GatewayToServer>(msg) {
                    Ok(GatewayToServer::Connect(connect)) => {
                        if connect.version != PROTOCOL_VERSION {
                            tracing::warn!(
                                "Gateway {} speaks protocol version {}, expected {}",
                                connect.name,
                                connect.version,
                                PROTOCOL_VERSION
                            );
                        }

                        tracing::info!("{} (ip = {}) connected", connect.name, packet.addr());
                        network::send_to_gateway(&net_tx, packet.addr(), &ServerToGateway::ConnectAck);
                    },
                    Ok(GatewayToServer::Command(command)) => {
                        tracing::debug!("{:?} from {}", command.command, command.actor.name);

                        let outcome = controller.handle_command(
                            &command.actor,
                            &command.origin,
                            &command.command,
                        );

                        if outcome.delete_invocation {
                            if let CommandOrigin::Channel { channel_id, message_id } = command.origin {
                                network::send_to_gateway(
                                    &net_tx,
                                    packet.addr(),
                                    &ServerToGateway::DeleteMessage(DeleteMessagePacket {
                                        channel_id,
                                        message_id,
                                    }),
                                );
                            }
                        }

                        for role_change in outcome.role_changes {
                            network::send_to_gateway(
                                &net_tx,
                                packet.addr(),
                                &ServerToGateway::Role(role_change),
                            );
                        }

                        if let Some(text) = outcome.reply {
                            let reply = ReplyPacket {
                                origin: command.origin,
                                recipient: command.actor.id,
                                text,
                            };
                            network::send_to_gateway(
                                &net_tx,
                                packet.addr(),
                                &ServerToGateway::Reply(reply),
                            );
                        }
                    },
                    Err(_) => {
                        tracing::warn!("Received an invalid packet from {}", packet.addr());
                    },
                }
            },
            SocketEvent::Timeout(addr) => {
                tracing::warn!("Gateway timed out: {}", addr);
            },
            SocketEvent::Connect(addr) => {
                tracing::info!("Gateway connected: {}", addr);
            },
            SocketEvent::Disconnect(addr) => {
                tracing::info!("Gateway disconnected: {}", addr);
            },
        }
    }
}
