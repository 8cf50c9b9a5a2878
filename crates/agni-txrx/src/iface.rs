//! Interface lookup shared by the TX and RX workers.

use pnet_datalink::NetworkInterface;

pub fn find_interface(name: &str) -> Option<NetworkInterface> {
    pnet_datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
}
