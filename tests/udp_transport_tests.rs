use broadside::transport::timeout::ReadTimeout;
use broadside::transport::udp::UdpTransport;
use broadside::transport::Transport;
use broadside::{Coordinate, FrameError, ShotMessage};
use std::time::Duration;
use tokio::net::UdpSocket;

fn c(x: u8, y: u8) -> Coordinate {
    Coordinate::new(x, y).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn hello_then_frames_both_ways() -> anyhow::Result<()> {
    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    let addr = socket.local_addr()?;

    let host = tokio::spawn(async move {
        let mut transport = UdpTransport::accept(socket).await.unwrap();
        let request = transport.recv().await.unwrap();
        assert_eq!(request.decode(), ShotMessage::request(c(2, 8)));
        transport
            .send(ShotMessage::result(c(2, 8), false).encode())
            .await
            .unwrap();
        transport.peer_addr()
    });

    let mut joiner = UdpTransport::connect(addr).await?;
    assert_eq!(joiner.peer_addr(), addr);
    joiner.send(ShotMessage::request(c(2, 8)).encode()).await?;
    let reply = joiner.recv().await?;
    assert_eq!(reply.as_bytes(), &[0x28, 0x00]);

    assert_eq!(host.await?.port(), joiner.local_addr()?.port());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn one_byte_datagram_is_malformed() -> anyhow::Result<()> {
    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    let addr = socket.local_addr()?;

    let host = tokio::spawn(async move {
        let mut transport = UdpTransport::accept(socket).await.unwrap();
        transport.recv().await
    });

    let raw = UdpSocket::bind("127.0.0.1:0").await?;
    raw.connect(addr).await?;
    raw.send(&[]).await?;
    raw.send(&[]).await?;
    raw.send(&[0x11]).await?;

    let err = host.await?.unwrap_err();
    assert_eq!(
        err.downcast_ref::<FrameError>(),
        Some(&FrameError::Malformed { len: 1 })
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn silent_peer_times_out() -> anyhow::Result<()> {
    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    let addr = socket.local_addr()?;
    let _host = tokio::spawn(async move { UdpTransport::accept(socket).await });

    let joiner = UdpTransport::connect(addr).await?;
    let mut wrapped = ReadTimeout::new(joiner, Duration::from_millis(50));
    assert_eq!(wrapped.limit(), Duration::from_millis(50));
    let err = wrapped.recv().await.unwrap_err();
    assert!(err.to_string().contains("Read timeout"));

    wrapped.close().await?;
    assert!(wrapped.is_shutdown());
    assert!(wrapped.send(ShotMessage::request(c(0, 0)).encode()).await.is_err());
    assert!(wrapped.recv().await.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn close_fails_the_peers_next_recv() -> anyhow::Result<()> {
    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    let addr = socket.local_addr()?;

    let host = tokio::spawn(async move {
        let mut transport = UdpTransport::accept(socket).await.unwrap();
        transport.close().await.unwrap();
        // A second close sends nothing further.
        transport.close().await.unwrap();
        assert!(transport.recv().await.is_err());
    });

    let mut joiner = UdpTransport::connect(addr).await?;
    host.await?;
    let res = tokio::time::timeout(Duration::from_secs(1), joiner.recv())
        .await
        .expect("peer close was not observed");
    let err = res.unwrap_err();
    assert_eq!(
        err.downcast_ref::<FrameError>(),
        Some(&FrameError::Malformed { len: 1 })
    );
    Ok(())
}
